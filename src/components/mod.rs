//! UI Components
//!
//! Reusable Leptos components and screens.

mod breadcrumb_bar;
mod companies_screen;
mod delete_confirm_button;
mod login_screen;
mod nav_bar;
mod page_editor;
mod page_tree_view;
mod pages_screen;
mod people_screen;
mod person_form;
mod profile_screen;
mod toast_host;
mod videos_screen;

pub use breadcrumb_bar::BreadcrumbBar;
pub use companies_screen::CompaniesScreen;
pub use delete_confirm_button::DeleteConfirmButton;
pub use login_screen::LoginScreen;
pub use nav_bar::NavBar;
pub use page_editor::PageEditor;
pub use page_tree_view::PageTreeView;
pub use pages_screen::PagesScreen;
pub use people_screen::PeopleScreen;
pub use person_form::PersonForm;
pub use profile_screen::ProfileScreen;
pub use toast_host::ToastHost;
pub use videos_screen::VideosScreen;
