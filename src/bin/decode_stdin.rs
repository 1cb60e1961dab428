//! Reads an HTML page from stdin and prints the decoded result as JSON.
//!
//! Usage: `decode_stdin <intent> [base_url] < page.html`, where intent is one
//! of `latest`, `ranking`, `search`, `detail`, `tag_index`, `reader`.

use std::io::{self, Read};

use rsc_comics::{decode_bytes_with_options, Intent, Options};

fn main() {
    let mut args = std::env::args().skip(1);
    let Some(intent) = args.next().as_deref().and_then(Intent::from_name) else {
        let names: Vec<_> = Intent::ALL.iter().map(|i| i.as_str()).collect();
        eprintln!("Usage: decode_stdin <{}> [base_url] < page.html", names.join("|"));
        std::process::exit(2);
    };
    let options = Options {
        base_url: args.next(),
        ..Options::default()
    };

    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let result = decode_bytes_with_options(&html, intent, &options);
    println!("{}", serde_json::to_string(&result).unwrap_or_default());
}
