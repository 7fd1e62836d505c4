pub mod errors;
pub mod db;
pub mod account;
pub mod dish;
pub mod order;

#[cfg(test)]
mod tests;
