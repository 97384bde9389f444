mod compare;
mod paths;
mod redirect;
mod registry;
mod roots;

pub use compare::cmd_compare;
pub use paths::cmd_paths;
pub use redirect::cmd_redirect;
pub use registry::{cmd_reg_get, cmd_reg_keys};
pub use roots::cmd_roots;
