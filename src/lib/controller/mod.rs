pub mod auto;
pub mod feedback;
pub mod motor;
pub mod pid_params;
pub mod steps;
