mod array;
pub use array::*;

mod field;
pub use field::*;

mod object;
pub use object::*;

mod primitives;
pub use primitives::*;
