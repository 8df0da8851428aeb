//! Client test suites, organized to mirror the implementation submodules
