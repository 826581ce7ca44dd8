pub mod delay_line;
