pub mod db;
pub mod errors;
pub mod ship;

#[cfg(test)]
mod tests;
