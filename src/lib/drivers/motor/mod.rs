pub mod mdd3a;
