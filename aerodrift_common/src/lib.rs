/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

//! stateless geometry primitives shared by the aerodrift crates. Everything in here is a pure function
//! of its arguments - there is no global state and nothing does I/O

pub mod angle;
pub mod geo_constants;
pub mod geo;

// syntactic sugar - this is just more readable in formulas
#[inline(always)] pub fn sin(x:f64) -> f64 { x.sin() }
#[inline(always)] pub fn sin2(x:f64) -> f64 { let sin_x = x.sin(); sin_x*sin_x }
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn asin(x:f64) -> f64 {x.asin() }
#[inline(always)] pub fn acos(x:f64) -> f64 {x.acos() }
#[inline(always)] pub fn atan2(y:f64,x:f64) -> f64 { y.atan2(x) }
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn deg(x:f64)->f64 { x.to_degrees() }
#[inline(always)] pub fn rad(x:f64)->f64 { x.to_radians() }
