use crossterm::style::Stylize;

pub fn success(msg: &str) {
    println!("{}", msg.green());
}

pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Plain line on stdout. Dry-run commands go through here untouched.
pub fn plain(msg: &str) {
    println!("{msg}");
}
