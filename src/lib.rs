pub mod assets;
pub mod dom;
pub mod loading;
pub mod navbar;
pub mod page;
