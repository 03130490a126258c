//! Portfolio item renderer: item cards in rows of two, followed by one
//! modal per item, injected into the portfolio container.

mod render;
mod types;

pub use render::{item_card, item_modal, PortfolioRenderer, RenderedPortfolio};
pub use types::{PortfolioData, PortfolioItem};
