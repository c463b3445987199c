mod helpers;
mod scenarios;
mod commands;
