mod bellman_tests;
mod value_iteration_tests;
