mod pad_summary;
