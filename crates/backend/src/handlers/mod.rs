pub mod a001_menu_category;
