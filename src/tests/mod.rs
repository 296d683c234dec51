//! Bin-side test suite exercising the face end to end through its public
//! API, the way the simulator drives it.

mod scenario_tests;
