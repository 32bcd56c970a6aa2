use clap::Parser;

fn main() {
    let cli = sqftcl::Cli::parse();
    sqftcl::init_logging(cli.debug);

    if let Err(e) = sqftcl::run(cli) {
        eprintln!("{:#}", e);
        std::process::exit(sqftcl::exit_code(&e));
    }
}
