mod layout;
mod styles;
mod values;
