pub mod merkle_tree;
