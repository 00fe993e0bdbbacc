pub mod city;
pub mod filter;
pub mod landmark;
pub mod listing;
pub mod month;
