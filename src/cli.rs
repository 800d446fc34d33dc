// cli.rs - Command-line interface configuration
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "goalmouth")]
#[command(about = "Interactive 3D soccer goal scene", long_about = None)]
pub struct Cli {
    /// Disable the on-screen HUD overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Start with the goalkeeper in the scene
    #[arg(long, default_value = "false")]
    pub keeper: bool,
}
