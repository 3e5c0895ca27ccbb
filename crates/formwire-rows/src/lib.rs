//! Repeating input rows instantiated from `<template>` elements.

pub mod error;
pub mod repeater;

pub use error::{Result, RowError};
pub use repeater::{GroupId, Removal, Row, RowGroup, RowId, RowRepeater, RowSetup, RowWiring};
