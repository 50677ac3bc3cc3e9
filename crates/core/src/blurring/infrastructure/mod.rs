pub mod vertical_box_blurrer;
