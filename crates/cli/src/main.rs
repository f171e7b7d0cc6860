fn main() {
    if let Err(e) = jbind_cli::run() {
        match e.sql_state() {
            Some(state) => eprintln!("ERROR {state}: {e}"),
            None => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }
}
