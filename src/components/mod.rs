//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod filter_bar;
mod new_todo_form;
mod not_found_view;
mod sign_in_view;
mod todo_list_view;
mod todo_row;
mod welcome_header;

pub use delete_confirm_button::DeleteConfirmButton;
pub use filter_bar::FilterBar;
pub use new_todo_form::NewTodoForm;
pub use not_found_view::NotFoundView;
pub use sign_in_view::SignInView;
pub use todo_list_view::TodoListView;
pub use todo_row::TodoRow;
pub use welcome_header::WelcomeHeader;
