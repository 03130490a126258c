use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use folio_core::consts::{
    DEFAULT_GALLERY_CONFIG, DEFAULT_LAYOUT_WIDTH, FILTER_CONTAINER_CLASS, GALLERY_CLASS,
};
use folio_core::gallery::markup::style_element;
use folio_core::gallery::render_gallery;
use folio_core::io::SiteSource;

#[derive(Args)]
pub struct GalleryArgs {
    /// Gallery configuration (YAML), relative to the root
    #[arg(default_value = DEFAULT_GALLERY_CONFIG)]
    pub config: String,

    /// Site root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Container width in pixels for the masonry layout pass
    #[arg(long, default_value_t = DEFAULT_LAYOUT_WIDTH)]
    pub width: u32,

    /// Write the fragment to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &GalleryArgs) -> Result<()> {
    let source = SiteSource::new(&args.root);
    let Some(view) = render_gallery(&source, &args.config, args.width) else {
        bail!("Failed to load gallery config from {}", args.config);
    };

    let mut out = style_element(&view.stylesheet()).render();
    out.push('\n');
    out.push_str(&format!(
        "<div class=\"{FILTER_CONTAINER_CLASS}\">{}</div>\n",
        view.filter_bar_markup()
    ));
    out.push_str(&format!(
        "<div class=\"{GALLERY_CLASS}\">{}</div>\n",
        view.gallery_markup()
    ));
    if let Some(ref script) = view.lightbox {
        out.push_str(&script.render());
        out.push('\n');
    }

    super::emit(&out, args.output.as_deref())
}
