// @generated by pagekit. Do not edit.

pub mod about;
pub mod todos_index;
pub mod todos_todo_edit;
