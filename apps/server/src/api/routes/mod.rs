pub mod ccds;
