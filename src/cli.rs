use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the ingredient catalog JSON file
    #[arg(long, default_value = "data/ingredients.json")]
    pub catalog_file: String,

    /// Address the HTTP server binds to
    #[arg(long, default_value = "0.0.0.0:3000")]
    pub listen: String,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
