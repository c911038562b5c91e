pub mod n20;
