use console::Style;
use folio_core::site::{BuildReport, SiteConfig};

use crate::commands::check::{CheckReport, DocumentCheck, GalleryCheck, PortfolioCheck};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    ok: Style,
    warn: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            ok: Style::new().green(),
            warn: Style::new().yellow().bold(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

fn print_document(s: &Styles, label: &str, path: Option<&str>) {
    match path {
        Some(p) => println!("  {:<14}{}", s.label.apply_to(label), s.path.apply_to(p)),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to(label),
            s.disabled.apply_to("disabled")
        ),
    }
}

pub fn print_site_summary(config: &SiteConfig) {
    let s = Styles::new();
    print_title(&s, "Folio Build");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Page"),
        s.path.apply_to(config.page_path().display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_path().display())
    );
    print_document(&s, "Portfolio", config.portfolio_data.as_deref());
    print_document(&s, "Gallery", config.gallery_config.as_deref());
    println!();

    println!("  {}", s.header.apply_to("Thumbnails"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Canvas"),
        s.value
            .apply_to(format!("{}x{}", config.resize.width, config.resize.height))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Quality"),
        s.value.apply_to(config.resize.quality)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Cache"),
        s.value.apply_to(match config.cache_capacity {
            Some(n) => format!("{n} images"),
            None => "unbounded".to_string(),
        })
    );
    println!();
}

pub fn print_build_report(report: &BuildReport) {
    let s = Styles::new();
    println!();

    if report.portfolio_rendered {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Portfolio"),
            s.ok.apply_to(format!("{} images resized", report.images_resized))
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Portfolio"),
            s.disabled.apply_to("not rendered")
        );
    }

    if report.gallery_rendered {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Gallery"),
            s.ok.apply_to(format!("{} tiles", report.gallery_tiles))
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Gallery"),
            s.disabled.apply_to("not rendered")
        );
    }

    println!(
        "  {:<14}{}",
        s.label.apply_to("Saved"),
        s.path.apply_to(report.output.display())
    );
    println!();
}

pub fn print_check_report(config: &SiteConfig, report: &CheckReport) {
    let s = Styles::new();
    print_title(&s, "Folio Check");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Root"),
        s.path.apply_to(config.root.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Portfolio"));
    match report.portfolio {
        DocumentCheck::Skipped => print_skipped(&s),
        DocumentCheck::Failed(ref e) => print_failed(&s, e),
        DocumentCheck::Loaded(ref p) => print_portfolio_check(&s, p),
    }
    println!();

    println!("  {}", s.header.apply_to("Gallery"));
    match report.gallery {
        DocumentCheck::Skipped => print_skipped(&s),
        DocumentCheck::Failed(ref e) => print_failed(&s, e),
        DocumentCheck::Loaded(ref g) => print_gallery_check(&s, g),
    }
    println!();
}

fn print_skipped(s: &Styles) {
    println!("    {}", s.disabled.apply_to("disabled"));
}

fn print_failed(s: &Styles, error: &str) {
    println!("    {} {}", s.warn.apply_to("error:"), error);
}

fn print_portfolio_check(s: &Styles, p: &PortfolioCheck) {
    println!(
        "    {:<12}{}",
        s.label.apply_to("Items"),
        s.value.apply_to(p.items)
    );
    for id in &p.duplicate_modal_ids {
        println!(
            "    {} modal id '{}' is used by more than one item",
            s.warn.apply_to("warning:"),
            id
        );
    }
}

fn print_gallery_check(s: &Styles, g: &GalleryCheck) {
    println!(
        "    {:<12}{}",
        s.label.apply_to("Categories"),
        s.value.apply_to(g.categories)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Items"),
        s.value.apply_to(g.items)
    );
    for (file, category) in &g.unknown_categories {
        println!(
            "    {} {} refers to undeclared category '{}'",
            s.warn.apply_to("warning:"),
            file,
            category
        );
    }
    if g.missing_images > 0 {
        println!(
            "    {} {} image(s) unreadable, placeholder used",
            s.warn.apply_to("warning:"),
            g.missing_images
        );
    }
}
