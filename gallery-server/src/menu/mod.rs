//! 菜单树
//!
//! - [`build_menu_tree`] - 扁平的 菜单 × 权限 行 → 带动作的嵌套森林

pub mod tree;

pub use tree::build_menu_tree;
