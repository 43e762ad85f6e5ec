use std::error::Error;
use std::io::{self, Write};

use dyn_array::{dyn_array, DynArray};

fn run<W: Write>(out: &mut W) -> Result<(), Box<dyn Error>> {
    let mut vec: DynArray<i32> = DynArray::new();
    vec.push(10);
    vec.push(20);
    vec.push(30);
    vec.push(40);
    vec.push(50);
    vec.push(60);
    vec.remove_last()?;
    writeln!(out, "The size of the vector is : {}", vec.len())?;

    vec.insert_at(5, 100)?;
    let filled = dyn_array![-1; 5];

    writeln!(out, "The size of the vector is : {}", vec.len())?;
    writeln!(out, "The capacity of the vector is : {}", vec.capacity())?;

    vec.erase_at(0)?;
    vec.erase_at(2)?;
    vec.erase_range(1..3)?;

    for val in &vec {
        writeln!(out, "{val}")?;
    }
    for val in &filled {
        writeln!(out, "{val}")?;
    }

    writeln!(out, "Is the vector empty = {}", vec.is_empty())?;

    let checked = *vec.at(1)?;
    // SAFETY: at(1) succeeded, so index 1 is below the length
    let unchecked = unsafe { *vec.get_unchecked(1) };
    writeln!(out, "Value at index 1 is : {unchecked} Or {checked}")?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    run(&mut io::stdout().lock())
}
