pub mod describe;
pub mod dot;
pub mod model;
pub mod plantuml;

pub use describe::{Description, describe, describe_with_options};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[value(name = "plantuml")]
    PlantUml,
    Dot,
}

pub fn render(description: &Description, format: Format) -> String {
    match format {
        Format::PlantUml => plantuml::render(description),
        Format::Dot => dot::render(description),
    }
}
