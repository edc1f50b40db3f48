mod builder;
mod preview;
