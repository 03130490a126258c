pub mod consts;
pub mod error;
pub mod gallery;
pub mod io;
pub mod markup;
pub mod portfolio;
pub mod resize;
pub mod site;
