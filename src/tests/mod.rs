mod primitives;
mod trace;
