/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
/// Bar query validation
pub mod bars;
/// Blocking JSON transport to the gateway
pub mod http;
/// Request models for API calls
pub mod requests;
/// JSON and argument helpers
pub mod utils;
