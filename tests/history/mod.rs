mod find_commits;
