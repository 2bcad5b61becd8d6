// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get at them.
#![allow(deprecated)]

use error_chain::error_chain;

use crate::units::MIN_GRID_SIZE;

error_chain! {

    errors {
        InvalidGridSize(size: usize) {
            description("invalid grid size")
            display("grid size {} is smaller than the minimum of {}", size, MIN_GRID_SIZE)
        }

        NoExitReached(attempts: usize) {
            description("maze growth never reached the exit column")
            display("maze growth never reached the exit column in {} attempts", attempts)
        }

        Unsolved {
            description("no route from start to goal")
            display("no route from start to goal")
        }

        MalformedMaze(reason: String) {
            description("malformed maze")
            display("malformed maze: {}", reason)
        }
    }
}
