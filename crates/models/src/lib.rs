pub mod errors;
pub mod db;
pub mod message;

#[cfg(test)]
mod tests;
