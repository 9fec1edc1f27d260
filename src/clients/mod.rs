pub mod nasa;
