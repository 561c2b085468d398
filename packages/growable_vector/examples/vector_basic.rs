//! Basic usage of the `growable_vector` crate:
//!
//! * Creating a vector.
//! * Adding items by value and by clone.
//! * Checked and unchecked access.
//! * Removing items and watching the capacity adjust.
//! * Copying and moving vectors.

use growable_vector::Vector;

fn main() {
    let mut vector = Vector::new();

    // The capacity doubles whenever a push finds the vector full.
    for value in 1..=5 {
        vector.push(value).unwrap();
        println!("pushed {value}: {vector}");
    }

    // Popping hands the item back. Once only a quarter of the slots are in use, the buffer halves.
    while let Some(value) = vector.pop().unwrap() {
        println!("popped {value}: {vector}");
    }

    let name = "Alice".to_string();
    let mut names = Vector::new();

    // The original stays usable after a cloning push.
    names.push_cloned(&name).unwrap();
    names.push("Bob".to_string()).unwrap();
    println!("{name} is still here, names: {names}");

    // Checked access reports an error instead of touching memory it does not own.
    match names.at(5) {
        Ok(found) => println!("found {found}"),
        Err(error) => println!("checked access failed: {error}"),
    }

    // SAFETY: Index 1 is less than the length of 2.
    let bob = unsafe { names.get_unchecked(1) };
    println!("unchecked access found {bob}");

    // A copy is independent of its original.
    let mut copy = names.clone();
    copy.push("Charlie".to_string()).unwrap();
    println!("original: {names}, copy: {copy}");

    // Taking moves the whole buffer and leaves an empty vector behind.
    let moved = names.take();
    println!("moved: {moved}, left behind: {names}");
}
