#![allow(dead_code)]

pub mod specs;
