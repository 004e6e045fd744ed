pub mod product_db;
