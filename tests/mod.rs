mod notifier_tests;
