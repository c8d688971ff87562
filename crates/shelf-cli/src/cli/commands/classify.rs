//! `shelf classify`: show how the login form will read an identifier.

use shelf_core::classify;

pub fn run(identifier: &str) {
    println!("{}", classify(identifier).kind());
}
