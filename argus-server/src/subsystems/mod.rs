pub mod analysis;
pub mod explorer;
pub mod pathways;
