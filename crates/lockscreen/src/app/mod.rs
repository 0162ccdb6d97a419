pub(crate) mod bootstrap;
mod controller;
mod nav;
mod options;
mod profiles;
mod view;
