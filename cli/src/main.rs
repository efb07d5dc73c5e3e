use clap::Parser;
use stdcheck_cli::cmd::Args;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let code = args.exec().unwrap_or_else(|e| {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    });
    std::process::exit(code);
}
