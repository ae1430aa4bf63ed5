use std::process;

use voctrain::{Config, Session, Terminal};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    println!("Welcome to voctrain!");
    match run() {
        Ok(()) => println!("Good bye."),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> voctrain::Result<()> {
    let config = Config::from_env()?;
    let session = Session::new(config)?;
    let mut console = Terminal;
    session.run(&mut console)
}
