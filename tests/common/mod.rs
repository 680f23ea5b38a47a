pub mod synthetic_contours;
