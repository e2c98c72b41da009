/// Everything needed to start one `<shell> -c <command>` subprocess.
#[derive(Debug, Clone)]
pub struct ShellInvocation {
    pub shell: String,
    pub command: String,
    pub directory: String,
    pub envs: Vec<(String, String)>,
}

impl ShellInvocation {
    pub fn new(
        shell: impl Into<String>,
        command: impl Into<String>,
        directory: impl Into<String>,
    ) -> Self {
        Self {
            shell: shell.into(),
            command: command.into(),
            directory: directory.into(),
            envs: Vec::new(),
        }
    }

    pub fn with_envs<I, K, V>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.envs
            .extend(envs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}
