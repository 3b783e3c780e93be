//! Layout Module
//!
//! Places the boxes of a code field using [Taffy](https://github.com/DioxusLabs/taffy)
//! flexbox. Layout parameters come straight from [`FieldProps`](crate::FieldProps);
//! the controller itself never looks at them.
//!
//! # Example
//!
//! ```ignore
//! use code_field::{layout_row, FieldProps};
//!
//! let row = layout_row(&FieldProps::digits(4))?;
//! for rect in &row.boxes {
//!     println!("{}x{} at {},{}", rect.width, rect.height, rect.x, rect.y);
//! }
//! ```

mod row;

pub use row::{layout_row, BoxRect, RowLayout};
