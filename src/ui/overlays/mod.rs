pub mod hover;
pub mod toast;
