pub mod ffmpeg_reader;
pub mod png_image_writer;
