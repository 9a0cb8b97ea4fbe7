pub mod photobook;
