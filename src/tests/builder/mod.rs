mod history_tests;
mod mutation_tests;
mod persistence_tests;
