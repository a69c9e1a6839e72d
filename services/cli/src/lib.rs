mod cli;
mod commands;
mod snapshot;

use gym_admission::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
