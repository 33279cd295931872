// Utility modules
pub mod icons;
