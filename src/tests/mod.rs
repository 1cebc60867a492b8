mod note_create;
mod note_delete;
mod pages;
