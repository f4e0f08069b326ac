use clap::Parser;
use jotc_drv::{run, Cli};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli, None) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }
}
